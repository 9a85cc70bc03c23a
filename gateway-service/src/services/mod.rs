pub mod acquirer;
pub mod metrics;
pub mod processor;
pub mod repository;

pub use acquirer::AcquirerClient;
pub use metrics::{get_metrics, init_metrics};
pub use processor::PaymentProcessor;
pub use repository::PaymentRepository;
