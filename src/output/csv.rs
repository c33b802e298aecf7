//! CSV output formatting for resolution results.

use super::NoMatchPolicy;
use crate::processing::ResolutionResult;
use std::io::Write;

/// Quote a CSV field, doubling any embedded quotes.
///
/// Every field is quoted so spreadsheet tools keep dotted addresses as text.
pub fn csv_field<T: ToString>(value: T) -> String {
    let value = value.to_string();
    format!("\"{}\"", value.replace('"', "\"\""))
}

/// Write a header row and one row per kept result.
///
/// Unmatched queries get empty `prefix` and `asn` fields under
/// [`NoMatchPolicy::Sentinel`].
pub fn write_csv<W: Write>(
    out: &mut W,
    results: &[ResolutionResult<'_>],
    policy: NoMatchPolicy,
) -> std::io::Result<()> {
    writeln!(out, r#""query","prefix","asn""#)?;

    for result in results {
        let (prefix, asn) = match (result.best_match(), policy) {
            (Some(block), _) => (block.to_string(), block.asn().to_string()),
            (None, NoMatchPolicy::Sentinel) => (String::new(), String::new()),
            (None, NoMatchPolicy::Skip) => continue,
        };
        writeln!(
            out,
            "{},{},{}",
            csv_field(result.query()),
            csv_field(prefix),
            csv_field(asn)
        )?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::parse_address;
    use crate::processing::resolve;
    use crate::registry::Registry;

    #[test]
    fn test_csv_field() {
        assert_eq!(csv_field("1.2.3.4"), "\"1.2.3.4\"");
        assert_eq!(csv_field(42), "\"42\"");
        assert_eq!(csv_field(""), "\"\"");
        assert_eq!(csv_field("say \"hi\""), "\"say \"\"hi\"\"\"");
    }

    #[test]
    fn test_write_csv() {
        let registry = Registry::load(["1.2.3.0 24 500"]);
        let results: Vec<_> = ["1.2.3.42", "9.9.9.9"]
            .iter()
            .map(|q| resolve(&registry, parse_address(q).unwrap()))
            .collect();

        let mut out = Vec::new();
        write_csv(&mut out, &results, NoMatchPolicy::Sentinel).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "\"query\",\"prefix\",\"asn\"\n\
             \"1.2.3.42\",\"1.2.3.0/24\",\"500\"\n\
             \"9.9.9.9\",\"\",\"\"\n"
        );

        let mut out = Vec::new();
        write_csv(&mut out, &results, NoMatchPolicy::Skip).unwrap();
        assert_eq!(String::from_utf8(out).unwrap().lines().count(), 2);
    }
}
