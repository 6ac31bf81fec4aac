/// Ports module defining the interfaces between the core and the outside world
///
/// Only outbound (driven) ports exist: the CLI drives the use cases directly.
pub mod outbound;
