#[fastfunc::fast_func(always)]
fn tick() {}

fn main() {}
