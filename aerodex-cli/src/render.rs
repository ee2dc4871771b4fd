//! Screen layouts shared by the menu shell and the one-shot commands.

use std::io::{self, Write};

use aerodex_core::MetricsSnapshot;
use aerodex_index::LoadReport;
use aerodex_storage::Catalog;

const TREE_INDENT: &str = "   ";

/// Every record sorted by code
pub fn key_order<W: Write>(out: &mut W, catalog: &Catalog) -> io::Result<()> {
    let mut result = Ok(());
    catalog.list_by_key_order(|record| {
        if result.is_ok() {
            result = writeln!(out, "{}", record);
        }
    });
    result
}

/// Every record in bucket order, prefixed with its bucket index
pub fn hash_order<W: Write>(out: &mut W, catalog: &Catalog) -> io::Result<()> {
    let mut result = Ok(());
    catalog.list_by_hash_order(|bucket, record| {
        if result.is_ok() {
            result = writeln!(out, "{:>3} {}", bucket, record);
        }
    });
    result
}

/// The tree on its side: root at the left margin, larger codes above
pub fn tree<W: Write>(out: &mut W, catalog: &Catalog) -> io::Result<()> {
    let mut result = Ok(());
    catalog.walk_tree(|depth, record| {
        if result.is_ok() {
            result = writeln!(out, "{}{}", TREE_INDENT.repeat(depth), record.code());
        }
    });
    result
}

pub fn report<W: Write>(out: &mut W, report: &LoadReport) -> io::Result<()> {
    writeln!(out, "The load factor is {:.2}%.", report.load_factor * 100.0)?;
    writeln!(out, "The number of hash nodes used is {}.", report.used_slots)?;
    writeln!(out, "The total size of hash is {}.", report.array_size)?;
    writeln!(out, "The total collision count is {}.", report.total_collisions)?;
    writeln!(out, "The longest linked list is {} nodes long.", report.longest_chain)?;
    writeln!(
        out,
        "The average number of nodes in a list is {:.2}.",
        report.average_chain_length
    )
}

pub fn metrics<W: Write>(out: &mut W, snapshot: &MetricsSnapshot) -> io::Result<()> {
    writeln!(out, "inserts:    {}", snapshot.inserts)?;
    writeln!(out, "deletes:    {}", snapshot.deletes)?;
    writeln!(
        out,
        "finds:      {} ({} hits, {:.1}%)",
        snapshot.finds,
        snapshot.find_hits,
        snapshot.hit_rate() * 100.0
    )?;
    writeln!(out, "promotions: {}", snapshot.promotions)?;
    writeln!(out, "resizes:    {} grow, {} shrink", snapshot.grows, snapshot.shrinks)
}

#[cfg(test)]
mod tests {
    use super::*;
    use aerodex_core::{Code, Record};

    fn catalog() -> Catalog {
        let records = ["MMM", "CCC", "TTT"]
            .iter()
            .map(|c| Record::new(Code::new(c).unwrap(), "Town", 1.5, -2.25))
            .collect();
        Catalog::load(records).unwrap()
    }

    fn render<F>(f: F) -> String
    where
        F: FnOnce(&mut Vec<u8>) -> io::Result<()>,
    {
        let mut out = Vec::new();
        f(&mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_key_order_lines() {
        let catalog = catalog();
        let text = render(|out| key_order(out, &catalog));
        let codes: Vec<&str> = text.lines().map(|l| &l[..3]).collect();
        assert_eq!(codes, vec!["CCC", "MMM", "TTT"]);
        assert!(text.starts_with(&format!("CCC {:<18} 1.50  -2.25\n", "Town")));
    }

    #[test]
    fn test_tree_indents_by_depth() {
        let catalog = catalog();
        let text = render(|out| tree(out, &catalog));
        assert_eq!(text, "   TTT\nMMM\n   CCC\n");
    }

    #[test]
    fn test_hash_order_prefixes_bucket() {
        let catalog = catalog();
        let text = render(|out| hash_order(out, &catalog));
        assert_eq!(text.lines().count(), 3);
        for line in text.lines() {
            let bucket: usize = line[..3].trim().parse().unwrap();
            assert!(bucket < catalog.hashed().capacity());
        }
    }

    #[test]
    fn test_report_lines() {
        let catalog = catalog();
        let text = render(|out| report(out, &catalog.load_report()));
        assert_eq!(text.lines().count(), 6);
        assert!(text.contains("The total size of hash is 6."));
    }
}
