/// ProgressReporter port for user-facing status messages
///
/// Messages go to a side channel (stderr) so the report on stdout stays
/// clean enough to pipe.
pub trait ProgressReporter: Send + Sync {
    /// Reports a progress message
    fn report(&self, message: &str);

    /// Reports a warning that does not stop the run
    fn report_warning(&self, message: &str);

    /// Reports completion of an operation
    fn report_completion(&self, message: &str);
}
