pub mod employees;

pub use employees::EmployeeFields;
