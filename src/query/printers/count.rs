//! `count`: the number of matching features.

use std::io::Write;

use crate::error::GolResult;
use crate::query::QuerySpec;

use super::QueryPrinter;

pub struct CountPrinter;

impl QueryPrinter for CountPrinter {
    fn run(&self, spec: &QuerySpec<'_>, out: &mut dyn Write) -> GolResult<()> {
        let mut count: u64 = 0;
        spec.for_each(|_| {
            count += 1;
            Ok(())
        })?;
        writeln!(out, "{}", count)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::printers::test_support::render;

    #[test]
    fn test_count_output() {
        assert_eq!(render(&CountPrinter, "", ""), "3\n");
        assert_eq!(render(&CountPrinter, "w", ""), "1\n");
        assert_eq!(render(&CountPrinter, "r", ""), "0\n");
    }
}
