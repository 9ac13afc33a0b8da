#[fastfunc::fast_func]
static TICKS: u32 = 0;

fn main() {}
