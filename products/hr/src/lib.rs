//! HR module: the employee directory.
//!
//! [`EmployeeService`] enforces the directory rules (unique email, existence
//! on update) on top of an [`EmployeeGateway`], the only code that talks to
//! the `employee` table.

pub mod error;
pub mod gateway;
pub mod model;
pub mod seed;
pub mod service;

pub use error::{HrError, HrResult, Lookup};
pub use gateway::{EmployeeGateway, SeaOrmEmployeeGateway};
pub use model::{Employee, MAX_EMAIL_LEN, MAX_NAME_LEN, NewEmployee};
pub use service::EmployeeService;
