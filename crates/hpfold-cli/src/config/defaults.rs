use std::path::PathBuf;

pub struct DefaultsConfig {
    pub sequence: String,
    pub num_reads: usize,
    pub sweeps: usize,
    pub image: PathBuf,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            sequence: "PPHPPHP".to_string(),
            num_reads: 1000,
            sweeps: 100,
            image: PathBuf::from("result.png"),
        }
    }
}
