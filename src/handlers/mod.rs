// handlers/mod.rs - Handlers grouped by access tier
//
// Public (no token) → Protected (account gate on /account/:id)
pub mod protected;
pub mod public;
