pub mod ai;
pub mod context;
pub mod damage;
pub mod effectiveness;
pub mod risk;

#[cfg(test)]
pub(crate) mod tests;
