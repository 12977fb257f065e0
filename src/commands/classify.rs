use crate::outcome::{self, ClassifyOptions};

pub fn run(root: String) -> Result<(), Box<dyn std::error::Error>> {
    outcome::run(root, ClassifyOptions::default())
}
