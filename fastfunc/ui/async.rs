#[fastfunc::fast_func]
async fn tick() {}

fn main() {}
