#[fastfunc::fast_func]
#[inline(always)]
fn tick() {}

fn main() {}
