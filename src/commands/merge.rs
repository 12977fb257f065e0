pub fn run(root: String) -> Result<(), Box<dyn std::error::Error>> {
    crate::merge::run(root)
}
