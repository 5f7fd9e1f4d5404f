use anyhow::{Context, Result};
use chrono::{DateTime, Local, Utc};
use chrono_english::{parse_date_string, Dialect};

pub fn parse_due_date(s: &str) -> Result<DateTime<Utc>> {
    let date = parse_date_string(s, Local::now(), Dialect::Uk)
        .with_context(|| format!("Could not parse due date '{}'", s))?;
    Ok(date.with_timezone(&Utc))
}
