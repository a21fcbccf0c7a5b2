//! CSV tables for headlines and articles.
//!
//! Article tables keep every input column, in input order, and then append
//! the annotation columns: the three sentiment columns when any record is
//! scored, then `category` when any record is categorised. Annotation columns
//! found in the input are parsed back into the record (so reports can read
//! annotated tables) and are never duplicated on write. Stored sentiment that
//! is out of range or mislabelled is dropped so it gets rescored.

use crate::models::{ArticleRecord, Category, Headline, Sentiment, SentimentLabel};
use crate::sentiment::label_for;
use crate::utils::ensure_parent_dir;
use csv::StringRecord;
use std::error::Error;
use std::fmt;
use std::io;
use std::path::Path;
use tracing::{info, instrument, warn};

/// Columns written after the input columns, in this order.
pub const ANNOTATION_COLUMNS: [&str; 4] = [
    "sentiment_polarity",
    "sentiment_subjectivity",
    "sentiment_label",
    "category",
];

/// Column layout for tables built from scraped articles.
pub const ARTICLE_COLUMNS: [&str; 4] = ["source", "title", "url", "text"];

/// Batch-level validation failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableError {
    /// A required column is absent from the header row.
    MissingColumn(&'static str),
}

impl fmt::Display for TableError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TableError::MissingColumn(name) => {
                write!(f, "CSV must have a {name:?} column with article content")
            }
        }
    }
}

impl Error for TableError {}

/// An article table: column layout plus records.
#[derive(Debug, Clone, PartialEq)]
pub struct ArticleTable {
    /// Non-annotation columns, in output order.
    pub columns: Vec<String>,
    pub records: Vec<ArticleRecord>,
}

impl ArticleTable {
    /// Table with the default scraped-article layout.
    pub fn from_records(records: Vec<ArticleRecord>) -> Self {
        Self {
            columns: ARTICLE_COLUMNS.iter().map(|c| c.to_string()).collect(),
            records,
        }
    }

    #[instrument(level = "info", skip_all, fields(path = %path.display()))]
    pub fn read_path(path: &Path) -> Result<Self, Box<dyn Error>> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    /// Parse a table. Rejects the whole batch when there is no `text` column;
    /// a missing `title` column reads as empty titles.
    pub fn from_reader<R: io::Read>(reader: R) -> Result<Self, Box<dyn Error>> {
        let mut rdr = csv::ReaderBuilder::new().flexible(true).from_reader(reader);
        let headers = rdr.headers()?.clone();

        if !headers.iter().any(|h| h == "text") {
            return Err(Box::new(TableError::MissingColumn("text")));
        }
        if !headers.iter().any(|h| h == "title") {
            warn!("Table has no title column; categorising on body text only");
        }

        let columns: Vec<String> = headers
            .iter()
            .filter(|h| !ANNOTATION_COLUMNS.contains(h))
            .map(str::to_string)
            .collect();

        let mut records = Vec::new();
        for row in rdr.records() {
            records.push(record_from_row(&headers, &row?));
        }

        Ok(Self { columns, records })
    }

    #[instrument(level = "info", skip_all, fields(path = %path.display()))]
    pub fn write_path(&self, path: &Path) -> Result<(), Box<dyn Error>> {
        ensure_parent_dir(path)?;
        let file = std::fs::File::create(path)?;
        self.to_writer(file)?;
        info!(rows = self.records.len(), "Wrote article table");
        Ok(())
    }

    pub fn to_writer<W: io::Write>(&self, writer: W) -> Result<(), Box<dyn Error>> {
        let mut wtr = csv::Writer::from_writer(writer);
        let scored = self.records.iter().any(|r| r.sentiment.is_some());
        let categorised = self.records.iter().any(|r| r.category.is_some());

        let mut header: Vec<&str> = self.columns.iter().map(String::as_str).collect();
        if scored {
            header.extend(&ANNOTATION_COLUMNS[..3]);
        }
        if categorised {
            header.push(ANNOTATION_COLUMNS[3]);
        }
        wtr.write_record(&header)?;

        for record in &self.records {
            let mut row: Vec<String> = self
                .columns
                .iter()
                .map(|c| record.column(c).to_string())
                .collect();
            let [polarity, subjectivity, label, category] = annotation_cells(record);
            if scored {
                row.extend([polarity, subjectivity, label]);
            }
            if categorised {
                row.push(category);
            }
            wtr.write_record(&row)?;
        }

        wtr.flush()?;
        Ok(())
    }
}

fn record_from_row(headers: &StringRecord, row: &StringRecord) -> ArticleRecord {
    let mut record = ArticleRecord::default();
    let mut polarity = None;
    let mut subjectivity = None;
    let mut label = None;

    for (i, name) in headers.iter().enumerate() {
        let value = row.get(i).unwrap_or("");
        match name {
            "source" => record.source = value.to_string(),
            "title" => record.title = value.to_string(),
            "url" => record.url = value.to_string(),
            "text" => record.text = value.to_string(),
            "sentiment_polarity" => polarity = value.parse::<f64>().ok(),
            "sentiment_subjectivity" => subjectivity = value.parse::<f64>().ok(),
            "sentiment_label" => label = value.parse::<SentimentLabel>().ok(),
            "category" => record.category = value.parse::<Category>().ok(),
            other => {
                record.extra.insert(other.to_string(), value.to_string());
            }
        }
    }

    if let (Some(polarity), Some(subjectivity), Some(label)) = (polarity, subjectivity, label) {
        let sentiment = Sentiment {
            polarity,
            subjectivity,
            label,
        };
        if is_consistent(&sentiment) {
            record.sentiment = Some(sentiment);
        } else {
            warn!(
                title = %record.title,
                polarity,
                subjectivity,
                %label,
                "Stored sentiment out of range or mislabelled; will rescore"
            );
        }
    }
    record
}

/// Stored scores must be in range and carry the label their polarity maps to.
fn is_consistent(sentiment: &Sentiment) -> bool {
    (-1.0..=1.0).contains(&sentiment.polarity)
        && (0.0..=1.0).contains(&sentiment.subjectivity)
        && label_for(sentiment.polarity) == sentiment.label
}

fn annotation_cells(record: &ArticleRecord) -> [String; 4] {
    let (polarity, subjectivity, label) = match record.sentiment {
        Some(s) => (s.polarity.to_string(), s.subjectivity.to_string(), s.label.to_string()),
        None => Default::default(),
    };
    let category = record.category.map(|c| c.to_string()).unwrap_or_default();
    [polarity, subjectivity, label, category]
}

#[instrument(level = "info", skip_all, fields(path = %path.display()))]
pub fn read_headlines(path: &Path) -> Result<Vec<Headline>, Box<dyn Error>> {
    let mut rdr = csv::Reader::from_path(path)?;
    let mut headlines = Vec::new();
    for row in rdr.deserialize() {
        headlines.push(row?);
    }
    info!(count = headlines.len(), "Loaded headlines");
    Ok(headlines)
}

#[instrument(level = "info", skip_all, fields(path = %path.display()))]
pub fn write_headlines(path: &Path, headlines: &[Headline]) -> Result<(), Box<dyn Error>> {
    ensure_parent_dir(path)?;
    let mut wtr = csv::Writer::from_path(path)?;
    for headline in headlines {
        wtr.serialize(headline)?;
    }
    wtr.flush()?;
    info!(count = headlines.len(), "Saved headlines");
    Ok(())
}
