//! # vdxconf
//!
//! A parser for VDX-style switch configuration dumps: indented command text
//! where a header line opens a block and a line holding only `!` closes it.
//!
//! ```text
//! fcoe
//!  fabric-map default
//!   vlan 1002
//!  !
//! !
//! hostname sw1
//! ```
//!
//! See [`vdx`] for the processing pipeline and the command tree model.
//!
//! ## Testing
//!
//! Tree shapes are checked with the fluent assertions in
//! [`vdx::testing`](crate::vdx::testing).

pub mod vdx;
