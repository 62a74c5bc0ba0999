//! Utility functions shared across the engine.

/// Truncates an id for display purposes.
///
/// Shows only the first 8 characters followed by ".." for longer strings.
pub fn truncate_id(id: &str) -> String {
	if id.len() <= 8 {
		id.to_string()
	} else {
		format!("{}..", &id[..8])
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn truncates_long_ids_only() {
		assert_eq!(truncate_id("short"), "short");
		assert_eq!(
			truncate_id("0b6ffbd1-9167-49f8-9e0a-62a04b552f03"),
			"0b6ffbd1.."
		);
	}
}
