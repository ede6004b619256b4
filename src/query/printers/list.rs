//! `list`: one `type/id` per line.

use std::io::Write;

use crate::error::GolResult;
use crate::query::QuerySpec;

use super::QueryPrinter;

pub struct ListPrinter;

impl QueryPrinter for ListPrinter {
    fn run(&self, spec: &QuerySpec<'_>, out: &mut dyn Write) -> GolResult<()> {
        spec.for_each(|feature| {
            writeln!(out, "{}", feature.display_id())?;
            Ok(())
        })
    }
}
