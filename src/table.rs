// CSV output tables. Every table starts with an unnamed row-index column.
use crate::model::{BusinessRecord, EnrichedRecord, TableError};

use csv::{ReaderBuilder, Writer};
use std::fs;
use std::io::{Read, Write};
use std::path::Path;

fn ensure_parent(path: &Path) -> Result<(), TableError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    Ok(())
}

pub fn write_business_table<W: Write>(w: W, records: &[BusinessRecord]) -> Result<(), TableError> {
    let mut wtr = Writer::from_writer(w);

    let mut header = vec![""];
    header.extend(BusinessRecord::COLUMNS);
    wtr.write_record(&header)?;

    for (i, record) in records.iter().enumerate() {
        let index = i.to_string();
        let mut row = vec![index.as_str()];
        row.extend(record.to_row());
        wtr.write_record(&row)?;
    }

    wtr.flush()?;
    Ok(())
}

pub fn write_enriched_table<W: Write>(w: W, records: &[EnrichedRecord]) -> Result<(), TableError> {
    let mut wtr = Writer::from_writer(w);

    let mut header = vec![""];
    header.extend(BusinessRecord::COLUMNS);
    header.extend(EnrichedRecord::EXTRA_COLUMNS);
    wtr.write_record(&header)?;

    for (i, record) in records.iter().enumerate() {
        let mut row = vec![i.to_string()];
        row.extend(record.to_row());
        wtr.write_record(&row)?;
    }

    wtr.flush()?;
    Ok(())
}

/// Reads records by header name. `title` and `address` are required; other
/// columns (including the index column) are optional.
pub fn read_business_table<R: Read>(r: R) -> Result<Vec<BusinessRecord>, TableError> {
    let mut rdr = ReaderBuilder::new().has_headers(true).from_reader(r);
    let records = rdr
        .deserialize::<BusinessRecord>()
        .collect::<Result<Vec<_>, _>>()?;
    Ok(records)
}

pub fn save_business_table(path: &Path, records: &[BusinessRecord]) -> Result<(), TableError> {
    ensure_parent(path)?;
    write_business_table(fs::File::create(path)?, records)
}

pub fn save_enriched_table(path: &Path, records: &[EnrichedRecord]) -> Result<(), TableError> {
    ensure_parent(path)?;
    write_enriched_table(fs::File::create(path)?, records)
}

pub fn load_business_table(path: &Path) -> Result<Vec<BusinessRecord>, TableError> {
    read_business_table(fs::File::open(path)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::PlaceResult;

    fn record(title: &str, address: &str) -> BusinessRecord {
        BusinessRecord {
            url: format!("https://www.bostonmagazine.com/best-of-boston/2017/{}/", title.to_lowercase()),
            year: "2017".into(),
            title: title.into(),
            description: "Pints, \"quoted\" praise.".into(),
            address: address.into(),
            neighborhood: "Cambridge".into(),
            phone: "617-555-0100".into(),
            website: "example.com".into(),
            category: "Beer Bar".into(),
        }
    }

    #[test]
    fn business_table_round_trips() {
        let records = vec![record("Hobo", "92 Hampshire St."), record("Regina", "11 Thacher St.")];
        let mut buf = Vec::new();
        write_business_table(&mut buf, &records).unwrap();

        let text = String::from_utf8(buf.clone()).unwrap();
        let mut lines = text.lines();
        assert_eq!(
            lines.next().unwrap(),
            ",url,year,title,description,address,neighborhood,phone,website,category"
        );
        assert!(lines.next().unwrap().starts_with("0,"));
        assert!(lines.next().unwrap().starts_with("1,"));

        let back = read_business_table(buf.as_slice()).unwrap();
        assert_eq!(back, records);

        let mut rdr = ReaderBuilder::new().from_reader(buf.as_slice());
        assert_eq!(rdr.headers().unwrap().len(), 1 + BusinessRecord::COLUMNS.len());
    }

    #[test]
    fn minimal_input_needs_only_title_and_address() {
        let csv = "title,address\nLord Hobo,92 Hampshire St.\n";
        let records = read_business_table(csv.as_bytes()).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].title, "Lord Hobo");
        assert_eq!(records[0].neighborhood, "");

        let missing = "title,phone\nLord Hobo,555\n";
        assert!(read_business_table(missing.as_bytes()).is_err());
    }

    #[test]
    fn enriched_table_has_place_columns() {
        let rows = vec![
            EnrichedRecord {
                record: record("Hobo", "92 Hampshire St."),
                place: PlaceResult {
                    formatted_address: Some("92 Hampshire St, Cambridge, MA".into()),
                    lat: Some(42.37),
                    lng: Some(-71.1),
                    name: Some("Lord Hobo".into()),
                    rating: Some(4.5),
                    types: Some("bar,restaurant".into()),
                    id: Some("abc".into()),
                    place_id: Some("ChIJ".into()),
                },
                query: "Hobo 92 Hampshire St. Cambridge".into(),
            },
            EnrichedRecord {
                record: record("Nowhere", "1 Nowhere"),
                place: PlaceResult::default(),
                query: "Nowhere 1 Nowhere Cambridge".into(),
            },
        ];
        let mut buf = Vec::new();
        write_enriched_table(&mut buf, &rows).unwrap();

        let mut rdr = ReaderBuilder::new().from_reader(buf.as_slice());
        let headers = rdr.headers().unwrap().clone();
        assert_eq!(headers.len(), 18);
        assert_eq!(&headers[10], "lat");
        assert_eq!(&headers[17], "query");

        let rows: Vec<csv::StringRecord> = rdr.records().collect::<Result<_, _>>().unwrap();
        assert_eq!(&rows[0][14], "bar,restaurant");
        assert_eq!(&rows[1][10], "");
        assert_eq!(&rows[1][16], "");
    }

    #[test]
    fn saves_into_missing_directory() {
        let dir = std::env::temp_dir().join("bob_table_save");
        let _ = fs::remove_dir_all(&dir);
        let path = dir.join("out").join("bob_data.csv");

        save_business_table(&path, &[record("Hobo", "92 Hampshire St.")]).unwrap();
        assert_eq!(load_business_table(&path).unwrap().len(), 1);
    }
}
