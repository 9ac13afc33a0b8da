#[fastfunc::fast_func]
#[link_section = ".itcm"]
fn tick() {}

fn main() {}
