//! Core domain types
//!
//! This module contains the domain structures shared between the clients
//! (wire shapes) and the dispatcher (launch and poll decisions).

pub mod definition;
pub mod task;
