use std::path::Path;

use log::LevelFilter;

use crate::error::AppError;

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.3f";

/// Route `log` records to `path`; the terminal itself belongs to the UI.
pub fn init(path: &Path, level: LevelFilter) -> Result<(), AppError> {
    fern::Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!(
                "[{} {} {}] {}",
                chrono::Local::now().format(TIMESTAMP_FORMAT),
                record.level(),
                record.target(),
                message
            ))
        })
        .level(level)
        .chain(fern::log_file(path)?)
        .apply()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timestamp_is_human_readable() {
        let stamp = chrono::NaiveDate::from_ymd_opt(2026, 10, 19)
            .and_then(|date| date.and_hms_milli_opt(9, 5, 7, 42))
            .unwrap()
            .format(TIMESTAMP_FORMAT)
            .to_string();
        assert_eq!(stamp, "2026-10-19 09:05:07.042");
    }
}
