pub mod queue_test;
