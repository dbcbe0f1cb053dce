
use serde::Serialize;
use serde_json::Value;
use std::{fs::File, error::Error, fmt::Display};


#[derive(Clone, Debug, Serialize)]
pub struct JsonTypes {
    pub corpus_file: String,
    pub output_dir: String,
    pub min_count: usize,
    pub threshold: f64,
    pub batch_size: usize,
    pub window_size: usize,
    pub drop_last: bool,
    pub valid_size: usize,
    pub valid_window: usize,
    pub top_k: usize,
    pub embedding_dim: usize,
    pub embedding_file: Option<String>,
    pub seed: Option<u64>
}

impl Display for JsonTypes {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "using hyper-params:
        corpus_file: {}
        output_dir: {}
        min_count: {}
        threshold: {}
        batch_size: {}
        window_size: {}
        drop_last: {}
        valid_size: {}
        valid_window: {}
        top_k: {}
        embedding_dim: {}
        embedding_file: {:?}
        seed: {:?}",
        self.corpus_file, self.output_dir, self.min_count, self.threshold, self.batch_size, self.window_size,
        self.drop_last, self.valid_size, self.valid_window, self.top_k, self.embedding_dim, self.embedding_file, self.seed)
    }
}

pub struct Config {
    params: JsonTypes
}

// typed access to an optional key, falling back to `default` when absent
fn get_usize(json: &Value, key: &str, default: usize) -> Result<usize, Box<dyn Error>> {
    match json.get(key) {
        Some(value) => {
            let n = value.as_u64().ok_or_else(|| format!("given {} is not a non negative integer", key))?;
            if n == 0 {
                return Err(format!("given {} must be positive", key).into());
            }
            Ok(n as usize)
        },
        None => Ok(default)
    }
}

fn get_str(json: &Value, key: &str) -> Result<Option<String>, Box<dyn Error>> {
    match json.get(key) {
        Some(value) => {
            let s = value.as_str().ok_or_else(|| format!("cannot cast {} to string", key))?;
            Ok(Some(s.to_owned()))
        },
        None => Ok(None)
    }
}

impl Config {

    pub fn get_params(&self) -> JsonTypes {
        self.params.clone()
    }

    /// Expects `args` as collected from the command line: the program name and a path to a json file.
    pub fn new(args: &[String]) -> Result<Config, Box<dyn Error>> {

        if args.len() != 2 {
            return Err("input should be a path to json file only".into());
        }

        // parse input json
        let f = File::open(&args[1])?;
        let json: Value = serde_json::from_reader(f)?;
        Config::from_json(&json)
    }

    pub fn from_json(json: &Value) -> Result<Config, Box<dyn Error>> {

        // validate input and output in json
        let corpus_file = get_str(json, "corpus_file")?.ok_or("corpus_file was not supplied through json")?;
        let output_dir = get_str(json, "output_dir")?.ok_or("output_dir was not supplied through json")?;

        // handle default vs input parameters
        let min_count = match json.get("min_count") {
            Some(min_count) => min_count.as_u64().ok_or("given min_count is not a non negative integer")? as usize,
            None => 5
        };
        let threshold = match json.get("threshold") {
            Some(threshold) => threshold.as_f64().ok_or("given threshold is not numeric")?,
            None => crate::subsample::DEFAULT_THRESHOLD
        };
        if !(threshold > 0.0) {
            return Err(format!("given threshold must be positive, got {}", threshold).into());
        }
        let drop_last = match json.get("drop_last") {
            Some(drop_last) => drop_last.as_bool().ok_or("given drop_last is not boolean")?,
            None => false
        };
        let seed = match json.get("seed") {
            Some(seed) => Some(seed.as_u64().ok_or("given seed is not a non negative integer")?),
            None => None
        };

        let params = JsonTypes {
            corpus_file,
            output_dir,
            min_count,
            threshold,
            batch_size: get_usize(json, "batch_size", 512)?,
            window_size: get_usize(json, "window_size", 5)?,
            drop_last,
            valid_size: get_usize(json, "valid_size", 16)?,
            valid_window: get_usize(json, "valid_window", 100)?,
            top_k: get_usize(json, "top_k", 8)?,
            embedding_dim: get_usize(json, "embedding_dim", 300)?,
            embedding_file: get_str(json, "embedding_file")?,
            seed
        };

        Ok(Self { params })
    }

}


pub mod files_handling {

    use std::{fs::{self, File}, error::Error, collections::HashMap, io::{BufWriter, BufReader}};
    use std::io::prelude::*;
    use ndarray::Array2;
    use ndarray_npy::{read_npy, write_npy};
    use flate2::{Compression, read::GzDecoder, write::GzEncoder};

    pub fn read_input<R: ReadFile>(file_path: &str) -> Result<R, Box<dyn Error>> {
        R::read_file(file_path)
    }

    pub fn save_output<S: SaveFile>(output_dir: &str, file_name: &str, item: &S) -> Result<(), Box<dyn Error>> {

        // create output folder
        fs::create_dir_all(output_dir)?;
        item.save_file(output_dir, file_name)
    }

    // `file_path` is always given without suffix, every type picks its own
    pub trait ReadFile: Sized {
        fn read_file(file_path: &str) -> Result<Self, Box<dyn Error>>;
    }

    pub trait SaveFile {
        fn save_file(&self, output_dir: &str, file_name: &str) -> Result<(), Box<dyn Error>>;
    }

    fn out_path(output_dir: &str, file_name: &str, suffix: &str) -> String {
        output_dir.to_string() + "/" + file_name + suffix
    }

    impl ReadFile for String {
        fn read_file(file_path: &str) -> Result<Self, Box<dyn Error>> {
            let in_file = file_path.to_string() + ".txt";
            Ok(fs::read_to_string(in_file)?)
        }
    }

    impl ReadFile for HashMap<String, usize> {
        fn read_file(file_path: &str) -> Result<Self, Box<dyn Error>> {
            let in_file = file_path.to_string() + ".json";
            let f = BufReader::new(File::open(in_file)?);
            Ok(serde_json::from_reader(f)?)
        }
    }

    impl ReadFile for HashMap<String, f64> {
        fn read_file(file_path: &str) -> Result<Self, Box<dyn Error>> {
            let in_file = file_path.to_string() + ".json";
            let f = BufReader::new(File::open(in_file)?);
            Ok(serde_json::from_reader(f)?)
        }
    }

    impl ReadFile for Vec<usize> {
        fn read_file(file_path: &str) -> Result<Self, Box<dyn Error>> {
            let in_file = file_path.to_string() + ".bin.gz";
            let f = BufReader::new(File::open(in_file)?);
            let mut reader = GzDecoder::new(f);
            let mut buf: Vec<u8> = Vec::new();
            reader.read_to_end(&mut buf)?;
            Ok(bincode::deserialize(&buf)?)
        }
    }

    impl ReadFile for Array2<f32> {
        fn read_file(file_path: &str) -> Result<Self, Box<dyn Error>> {
            let in_file = file_path.to_string() + ".npy";
            Ok(read_npy(in_file)?)
        }
    }

    impl SaveFile for HashMap<String, usize> {
        fn save_file(&self, output_dir: &str, file_name: &str) -> Result<(), Box<dyn Error>> {
            let f = BufWriter::new(File::create(out_path(output_dir, file_name, ".json"))?);
            serde_json::to_writer(f, self)?;
            Ok(())
        }
    }

    impl SaveFile for HashMap<String, f64> {
        fn save_file(&self, output_dir: &str, file_name: &str) -> Result<(), Box<dyn Error>> {
            let f = BufWriter::new(File::create(out_path(output_dir, file_name, ".json"))?);
            serde_json::to_writer(f, self)?;
            Ok(())
        }
    }

    impl SaveFile for super::JsonTypes {
        fn save_file(&self, output_dir: &str, file_name: &str) -> Result<(), Box<dyn Error>> {
            let f = BufWriter::new(File::create(out_path(output_dir, file_name, ".json"))?);
            serde_json::to_writer_pretty(f, self)?;
            Ok(())
        }
    }

    impl SaveFile for Vec<usize> {
        fn save_file(&self, output_dir: &str, file_name: &str) -> Result<(), Box<dyn Error>> {
            let f = BufWriter::new(File::create(out_path(output_dir, file_name, ".bin.gz"))?);
            let mut writer = GzEncoder::new(f, Compression::default());
            bincode::serialize_into(&mut writer, self)?;
            writer.finish()?.flush()?;
            Ok(())
        }
    }

    impl SaveFile for Array2<f32> {
        fn save_file(&self, output_dir: &str, file_name: &str) -> Result<(), Box<dyn Error>> {
            write_npy(out_path(output_dir, file_name, ".npy"), self)?;
            Ok(())
        }
    }

}


#[cfg(test)]
mod tests {

    use super::*;
    use super::files_handling::{read_input, save_output};
    use ndarray::{array, Array2};
    use serde_json::json;
    use std::collections::HashMap;

    #[test]
    fn defaults_test() {

        let json = json!({"corpus_file": "data/text8", "output_dir": "Output"});
        let params = Config::from_json(&json).unwrap().get_params();

        assert_eq!(params.min_count, 5);
        assert_eq!(params.threshold, 1e-5);
        assert_eq!(params.batch_size, 512);
        assert_eq!(params.window_size, 5);
        assert!(!params.drop_last);
        assert_eq!(params.valid_size, 16);
        assert_eq!(params.valid_window, 100);
        assert_eq!(params.embedding_dim, 300);
        assert_eq!(params.embedding_file, None);
        assert_eq!(params.seed, None);
    }

    #[test]
    fn overrides_test() {

        let json = json!({
            "corpus_file": "c", "output_dir": "o", "threshold": 0.001, "batch_size": 4,
            "window_size": 2, "drop_last": true, "seed": 17, "embedding_file": "Output/vecs"
        });
        let params = Config::from_json(&json).unwrap().get_params();
        assert_eq!(params.threshold, 0.001);
        assert_eq!(params.batch_size, 4);
        assert_eq!(params.window_size, 2);
        assert!(params.drop_last);
        assert_eq!(params.seed, Some(17));
        assert_eq!(params.embedding_file.as_deref(), Some("Output/vecs"));
        assert!(params.to_string().contains("batch_size: 4"));
    }

    #[test]
    fn invalid_config_test() {

        assert!(Config::from_json(&json!({"output_dir": "o"})).is_err());
        assert!(Config::from_json(&json!({"corpus_file": "c", "output_dir": "o", "batch_size": 0})).is_err());
        assert!(Config::from_json(&json!({"corpus_file": "c", "output_dir": "o", "window_size": "5"})).is_err());
        assert!(Config::from_json(&json!({"corpus_file": "c", "output_dir": "o", "threshold": 0.0})).is_err());
        assert!(Config::new(&["prog".to_string()]).is_err());
    }

    #[test]
    fn files_round_trip_test() {

        let output_dir = std::env::temp_dir().join("skipgram_prep_files_test");
        let output_dir = output_dir.to_str().unwrap();

        let encoded: Vec<usize> = vec![3, 1, 4, 1, 5, 9, 2, 6];
        save_output(output_dir, "train_words", &encoded).unwrap();
        let loaded = read_input::<Vec<usize>>(&format!("{}/train_words", output_dir)).unwrap();
        assert_eq!(loaded, encoded);

        let t2i: HashMap<String, usize> = [("a".to_string(), 0), ("b".to_string(), 1)].into_iter().collect();
        save_output(output_dir, "words", &t2i).unwrap();
        assert_eq!(read_input::<HashMap<String, usize>>(&format!("{}/words", output_dir)).unwrap(), t2i);

        let w: Array2<f32> = array![[1.0, 2.0], [3.0, 4.0]];
        save_output(output_dir, "vecs", &w).unwrap();
        assert_eq!(read_input::<Array2<f32>>(&format!("{}/vecs", output_dir)).unwrap(), w);
    }

}
