/// Data Transfer Objects for application layer
///
/// DTOs carry data between the CLI, the use cases and the formatters,
/// keeping the domain layer isolated.
mod output_format;
mod report_request;
mod report_response;

pub use output_format::OutputFormat;
pub use report_request::ReportRequest;
pub use report_response::ReportResponse;
