//! Punycode and internationalized domain name conversion.
//!
//! Domain names are limited to ASCII on the wire. Internationalized
//! domain names (IDNs) work around this by encoding each non-ASCII label
//! of a name into an ASCII form via the Punycode algorithm specified in
//! [RFC 3492] and marking the result with the ACE prefix `xn--`. This
//! crate provides that codec and a thin converter that applies it to a
//! full domain name label by label.
//!
//! # Modules
//!
//! * [bootstring] contains the fixed parameter set of the algorithm and
//!   the numeric primitives built on it,
//! * [punycode] contains the codec itself, and
#![cfg_attr(feature = "std", doc = "* [domain]")]
#![cfg_attr(not(feature = "std"), doc = "* domain")]
//!   applies the codec to whole domain names. This module requires the
//!   `std` feature.
//!
//! # Reference of Feature Flags
//!
//! * `std`: support for the Rust std library. This feature is enabled by
//!   default. Without it, only the allocation-free parts of the codec are
//!   available: the [punycode] encoder writes into any [`core::fmt::Write`]
//!   target, while the decoder and the domain converter need to grow and
//!   splice buffers and are therefore gated.
//!
//! [RFC 3492]: https://datatracker.ietf.org/doc/html/rfc3492

#![no_std]
#![cfg_attr(docsrs, feature(doc_cfg))]

#[cfg(feature = "std")]
#[allow(unused_imports)] // Import macros even if unused.
#[macro_use]
extern crate std;

pub mod bootstring;
#[cfg(feature = "std")]
#[cfg_attr(docsrs, doc(cfg(feature = "std")))]
pub mod domain;
pub mod punycode;
