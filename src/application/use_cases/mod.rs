/// Use cases module containing application business logic orchestration
mod check_rate_limits;
mod generate_report;

pub use check_rate_limits::CheckRateLimitsUseCase;
pub use generate_report::GenerateReportUseCase;
