//! # fscore - Piotroski F-Score evaluation and ranking
//!
//! Scores listed equities on the nine Piotroski criteria and ranks a universe by
//! the result:
//! - Decoding of provider indicator histories (current and prior period)
//! - Evaluation of the nine criteria into a 0-9 score
//! - Ranking by score, then by cheapest quote
//! - CSV universe listings, current or as of a past year
//!
//! ## Quick Start
//!
//! ```rust
//! use fscore::prelude::*;
//!
//! let listing = "ticker,price\nPETR4,35.2\nVALE3,61.0\n";
//! let universe = fscore::services::universe_loader::parse_universe(listing.as_bytes()).unwrap();
//!
//! let mut scores = ScoreMap::new();
//! scores.insert("VALE3".to_string(), CriteriaResult { roa_positive: true, ..Default::default() });
//!
//! let ranked = rank(&universe, &scores);
//! assert_eq!(ranked.rows()[0].ticker, "VALE3");
//! ```

pub mod analysis;
pub mod error;
pub mod models;
pub mod services;
pub mod utils;

pub use error::{FscoreError, Result};

pub mod prelude {
    //! Prelude module for convenient imports
    //!
    //! ```rust
    //! use fscore::prelude::*;
    //! ```

    pub use crate::analysis::{evaluate, evaluate_history, rank};
    pub use crate::error::FscoreError;
    pub use crate::models::{
        CriteriaResult, Criterion, IndicatorHistory, IndicatorRecord, RankedRow, RankedTable, ScoreMap,
        UniverseRow, UniverseSelection, UniverseTable,
    };
    pub use crate::services::UniverseLoader;
}

pub use utils::{init_logger, Logger, Timer};
