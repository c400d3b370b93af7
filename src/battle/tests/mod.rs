pub mod common;





#[cfg(test)]
mod test_candidates;

#[cfg(test)]
mod test_ranking;
