//! Pure derivation engines for shopsight.
//!
//! Every function here is a pure transform over `(products, filters)` —
//! no caching, no interior state. Derived views are recomputed wholesale on
//! each read, which keeps every derivation independently testable and is
//! plenty fast for catalogs in the thousands of rows.

pub mod aggregate;
pub mod filter;
pub mod health;
pub mod kpi;
pub mod rank;

mod util;

pub use aggregate::aggregate;
pub use filter::apply;
pub use health::score;
pub use kpi::kpis;
pub use rank::{
    all_categories, category_counts, category_top_products, page_count, paginate,
    similar_products, sort_products, top_expensive, SortKey,
};
