//! Built-in Workloads
//!
//! Five ways of producing the vector `[1, 2, ..., n]`, compared by the
//! `chronos` binary for every configured input size.

use crate::executor::Testcase;
use regex::Regex;

/// One built-in unit of work, parameterised by the input size
#[derive(Debug, Clone, Copy)]
pub struct Workload {
    /// Name shown in listings and reports
    pub name: &'static str,
    /// One-line description for `chronos list`
    pub description: &'static str,
    /// Produces `[1, 2, ..., n]`
    pub run: fn(usize) -> Vec<usize>,
}

/// Every built-in workload, in report order
pub const WORKLOADS: &[Workload] = &[
    Workload {
        name: "zeroed",
        description: "allocate zeroed storage, then assign by index",
        run: zeroed,
    },
    Workload {
        name: "raw-fill",
        description: "reserve capacity and write through uninitialised slots",
        run: raw_fill,
    },
    Workload {
        name: "push",
        description: "grow an empty vector one element at a time",
        run: push,
    },
    Workload {
        name: "map",
        description: "map a range into a pre-sized vector",
        run: map,
    },
    Workload {
        name: "collect",
        description: "collect an inclusive range directly",
        run: collect,
    },
];

fn zeroed(n: usize) -> Vec<usize> {
    let mut values = vec![0usize; n];
    for (i, slot) in values.iter_mut().enumerate() {
        *slot = i + 1;
    }
    values
}

fn raw_fill(n: usize) -> Vec<usize> {
    let mut values: Vec<usize> = Vec::with_capacity(n);
    for (i, slot) in values.spare_capacity_mut().iter_mut().take(n).enumerate() {
        slot.write(i + 1);
    }
    // SAFETY: the loop above initialised the first `n` slots and the
    // capacity is at least `n`.
    unsafe { values.set_len(n) };
    values
}

fn push(n: usize) -> Vec<usize> {
    let mut values = Vec::new();
    for i in 1..=n {
        values.push(i);
    }
    values
}

fn map(n: usize) -> Vec<usize> {
    let mut values = Vec::with_capacity(n);
    values.extend((0..n).map(|i| i + 1));
    values
}

fn collect(n: usize) -> Vec<usize> {
    (1..=n).collect()
}

/// Workloads whose name matches `filter`, in report order
pub fn select(filter: &Regex) -> Vec<&'static Workload> {
    WORKLOADS.iter().filter(|w| filter.is_match(w.name)).collect()
}

/// Wrap workloads as testcases over a `usize` input
pub fn testcases(workloads: &[&'static Workload]) -> Vec<Testcase<'static, usize>> {
    workloads
        .iter()
        .map(|workload| {
            let run = workload.run;
            Testcase::new(workload.name, move |n: &usize| run(*n))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_workloads_agree() {
        for n in [0, 1, 7, 1000] {
            let expected: Vec<usize> = (1..=n).collect();
            for workload in WORKLOADS {
                assert_eq!((workload.run)(n), expected, "workload {}", workload.name);
            }
        }
    }

    #[test]
    fn test_names_are_unique() {
        let mut names: Vec<&str> = WORKLOADS.iter().map(|w| w.name).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), WORKLOADS.len());
    }

    #[test]
    fn test_select_by_regex() {
        let all = select(&Regex::new(".*").unwrap());
        assert_eq!(all.len(), WORKLOADS.len());

        let some = select(&Regex::new("^(push|map)$").unwrap());
        let names: Vec<&str> = some.iter().map(|w| w.name).collect();
        assert_eq!(names, vec!["push", "map"]);

        assert!(select(&Regex::new("nothing-matches").unwrap()).is_empty());
    }

    #[test]
    fn test_testcases_keep_names() {
        let selected = select(&Regex::new("fill|collect").unwrap());
        let testcases = testcases(&selected);
        let names: Vec<&str> = testcases.iter().map(|t| t.name()).collect();
        assert_eq!(names, vec!["raw-fill", "collect"]);
    }
}
