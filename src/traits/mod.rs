pub mod dataplane;

pub use dataplane::Dataplane;
