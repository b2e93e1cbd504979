//! Compare five ways of building `[1, 2, ..., n]` across input sizes.
//!
//! Run with: cargo run --release --example playground

use chronos::prelude::*;
use std::mem::MaybeUninit;

fn zeroed(n: &usize) -> Vec<usize> {
    let mut values = vec![0; *n];
    for (i, slot) in values.iter_mut().enumerate() {
        *slot = i + 1;
    }
    values
}

fn boxed_slice(n: &usize) -> Box<[usize]> {
    let mut values: Box<[MaybeUninit<usize>]> = Box::new_uninit_slice(*n);
    for (i, slot) in values.iter_mut().enumerate() {
        slot.write(i + 1);
    }
    // SAFETY: every slot was written above.
    unsafe { values.assume_init() }
}

fn push(n: &usize) -> Vec<usize> {
    let mut values = Vec::new();
    for i in 1..=*n {
        values.push(i);
    }
    values
}

fn map(n: &usize) -> Vec<usize> {
    (0..*n).map(|i| i + 1).collect()
}

fn range(n: &usize) -> Vec<usize> {
    (1..=*n).collect()
}

fn main() -> anyhow::Result<()> {
    let inputs = [10, 100, 1_000, 10_000, 100_000, 1_000_000];
    let iterations = 10;

    let mut testcases = vec![
        Testcase::new("Zeroed", zeroed),
        Testcase::new("Boxed", boxed_slice),
        Testcase::new("Push", push),
        Testcase::new("Map", map),
        Testcase::new("Range", range),
    ];

    for input in inputs {
        let group = run_testcase_group(&mut testcases, input, iterations)?;
        print!("{group}");
    }

    Ok(())
}
