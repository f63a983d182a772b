//! ld-agent example modules
//!
//! Two plugin modules for the ld-agent host, a calculator and a minimal
//! greeting module, together with the descriptor and operation registry
//! types they are built from.
//!
//! ```
//! use ld_agent_examples::modules::calculator;
//! use ld_agent_examples::plugins::Value;
//!
//! let module = calculator::init().unwrap();
//! let sum = module
//!     .registry()
//!     .invoke("add_numbers", &[Value::Number(2.0), Value::Number(3.0)])
//!     .unwrap();
//! assert_eq!(sum, Value::Number(5.0));
//! ```

pub mod config;
pub mod error;
pub mod logging;
pub mod modules;
pub mod plugins;

pub use error::{LdAgentError, Result};
