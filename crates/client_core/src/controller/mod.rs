//! Controller layer: page state and handlers invoked by the UI binding layer.

pub mod bills;
pub mod new_bill;

#[cfg(test)]
#[path = "../tests/controller_tests.rs"]
mod tests;
