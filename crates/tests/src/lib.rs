#[cfg(test)]
mod common;

#[cfg(test)]
mod refresh_tests;

#[cfg(test)]
mod auth_flow_tests;

#[cfg(test)]
mod error_tests;

#[cfg(test)]
mod endpoint_tests;

#[cfg(test)]
mod guard_table_tests;
