//! Data layer: core types, loading, enrichment, filtering and aggregation.
//!
//! Architecture:
//! ```text
//!   dataset .json
//!        │
//!        ▼
//!   ┌──────────┐   literal: Python-style `solution` cells → JSON values
//!   │  loader   │  enrich:  text → question type → provocativeness,
//!   └──────────┘            subject code → display name
//!        │
//!        ▼
//!   ┌───────────────┐
//!   │ QuestionTable  │  Vec<QuestionRecord>, distinct subjects / types
//!   └───────────────┘
//!        │
//!        ▼
//!   ┌──────────┐
//!   │  filter   │  subjects ∧ types ∧ score range → filtered indices
//!   └──────────┘
//!        │
//!        ▼
//!   ┌───────────┐
//!   │ aggregate  │  grouped counts and means for the charts
//!   └───────────┘
//! ```

pub mod aggregate;
pub mod enrich;
pub mod filter;
pub mod literal;
pub mod loader;
pub mod model;
pub mod subject;
