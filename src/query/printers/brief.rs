//! `brief`: one line per feature with its name, then a total.

use std::io::Write;

use crate::error::GolResult;
use crate::query::QuerySpec;

use super::QueryPrinter;

pub struct BriefPrinter;

impl QueryPrinter for BriefPrinter {
    fn run(&self, spec: &QuerySpec<'_>, out: &mut dyn Write) -> GolResult<()> {
        let mut count: u64 = 0;
        spec.for_each(|feature| {
            count += 1;
            match feature.name() {
                Some(name) => writeln!(out, "{:<16} {}", feature.display_id(), name)?,
                None => writeln!(out, "{}", feature.display_id())?,
            }
            Ok(())
        })?;
        let noun = if count == 1 { "feature" } else { "features" };
        writeln!(out, "{} {}", count, noun)?;
        Ok(())
    }
}
