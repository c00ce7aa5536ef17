pub mod xlsx;

pub use xlsx::{ReportWriter, XlsxReportWriter};
