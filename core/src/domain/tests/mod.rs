mod aggregate_tests;
mod event_buffer_tests;
