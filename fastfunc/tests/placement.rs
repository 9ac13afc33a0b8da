//! Marked functions keep their signature and behavior in both configurations
//!
//! With `code-in-ram` enabled on a hosted target the marked functions live in
//! non-executable `.data`, so they are only called when the feature is off.

use fastfunc::{fast_func, Placement, PLACEMENT, SECTION};

#[fast_func]
fn tick(counter: u32) -> u32 {
    counter.wrapping_add(1)
}

#[fastfunc::fast_func]
#[fastfunc::fast_func]
fn tick_twice(counter: u32) -> u32 {
    tick(tick(counter))
}

// Placed in `.data` in both configurations, never called
#[fast_func]
#[inline(never)]
#[unsafe(link_section = ".data")]
fn explicit(counter: u32) -> u32 {
    counter
}

#[fast_func]
#[no_mangle]
extern "C" fn fastfunc_test_mac(acc: i64, a: i32, b: i32) -> i64 {
    acc + i64::from(a) * i64::from(b)
}

#[fast_func]
unsafe fn read(ptr: *const u32) -> u32 {
    *ptr
}

#[fast_func]
const fn double(x: u32) -> u32 {
    x * 2
}

// Usable in const context in both configurations
const FOUR: u32 = double(2);

fn helper(x: u32) -> u32 {
    x + 1
}

struct Counter {
    count: u32,
}

impl Counter {
    #[fast_func]
    pub fn bump(&mut self) -> u32 {
        self.count += 1;
        self.count
    }
}

trait Filter {
    #[fast_func]
    fn run(&self, samples: &[i32]) -> i64 {
        samples.iter().map(|&s| i64::from(s)).sum()
    }
}

struct Sum;

impl Filter for Sum {}

#[test]
fn configuration() {
    assert_eq!(SECTION, ".data");

    if cfg!(feature = "code-in-ram") {
        assert_eq!(PLACEMENT, Placement::Fast);
        assert_eq!(PLACEMENT.to_string(), "fast (.data)");
    } else {
        assert_eq!(PLACEMENT, Placement::Default);
        assert_eq!(PLACEMENT.to_string(), "default");
    }
}

#[test]
fn signatures_are_unchanged() {
    let _: fn(u32) -> u32 = tick;
    let _: fn(u32) -> u32 = tick_twice;
    let _: fn(u32) -> u32 = explicit;
    let _: fn(u32) -> u32 = helper;
    let _: extern "C" fn(i64, i32, i32) -> i64 = fastfunc_test_mac;
    let _: unsafe fn(*const u32) -> u32 = read;
    let _: fn(&mut Counter) -> u32 = Counter::bump;
    let _: fn(&Sum, &[i32]) -> i64 = <Sum as Filter>::run;

    assert_eq!(FOUR, 4);
}

#[test]
fn behavior_is_unchanged() {
    if fastfunc::is_enabled() {
        return;
    }

    assert_eq!(tick(0), 1);
    assert_eq!(tick(u32::MAX), 0);
    assert_eq!(tick_twice(1), 3);
    assert_eq!(helper(1), 2);
    assert_eq!(fastfunc_test_mac(10, 3, -4), -2);
    assert_eq!(unsafe { read(&42) }, 42);
    assert_eq!(double(21), 42);

    let mut counter = Counter { count: 0 };
    assert_eq!(counter.bump(), 1);
    assert_eq!(counter.bump(), 2);

    assert_eq!(Sum.run(&[1, 2, 3, -4]), 2);
}
