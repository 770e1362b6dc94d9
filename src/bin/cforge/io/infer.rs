use std::path::Path;

use comp_forge::io::Format;

pub fn table_format(path: &Path) -> Option<Format> {
    let ext = path.extension()?.to_str()?.to_lowercase();
    match ext.as_str() {
        "json" => Some(Format::Json),
        "csv" => Some(Format::Csv),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn infers_known_extensions_case_insensitively() {
        assert_eq!(table_format(Path::new("alloys.json")), Some(Format::Json));
        assert_eq!(table_format(Path::new("out/ALLOYS.CSV")), Some(Format::Csv));
    }

    #[test]
    fn unknown_or_missing_extension_is_none() {
        assert_eq!(table_format(Path::new("alloys.xlsx")), None);
        assert_eq!(table_format(Path::new("alloys")), None);
    }
}
