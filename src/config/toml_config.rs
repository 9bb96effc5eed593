use crate::core::{Day, Product, RatedItem, Value};
use crate::utils::error::{DrillError, Result};
use crate::utils::validation::{self, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const DEFAULT_REPORT_FILENAME: &str = "report.json";
const MIN_VEHICLE_YEAR: u32 = 1886;

/// 練習情境檔 (TOML)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DrillsConfig {
    pub run: RunConfig,
    pub output: Option<OutputConfig>,
    #[serde(default)]
    pub format: Vec<FormatCase>,
    pub ratings: Option<RatingsConfig>,
    pub concat: Option<ConcatConfig>,
    #[serde(default)]
    pub vehicles: Vec<VehicleConfig>,
    pub process: Option<ProcessConfig>,
    pub products: Option<ProductsConfig>,
    pub days: Option<DaysConfig>,
    pub square: Option<SquareConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunConfig {
    pub name: String,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    pub path: Option<String>,
    pub filename: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormatCase {
    pub text: String,
    pub upper: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RatingsConfig {
    pub items: Vec<RatedItem>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConcatConfig {
    pub arrays: Vec<Vec<serde_json::Value>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VehicleConfig {
    pub make: String,
    pub year: u32,
    pub model: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProcessConfig {
    pub values: Vec<Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductsConfig {
    pub items: Vec<Product>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DaysConfig {
    pub days: Vec<Day>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SquareConfig {
    pub inputs: Vec<f64>,
}

impl DrillsConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(DrillError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| DrillError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${DRILL_NAME})，未設定的變數保持原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| DrillError::ConfigValidationError {
            field: "environment".to_string(),
            message: e.to_string(),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.into_owned())
    }

    /// 驗證配置的合理性
    pub fn validate_config(&self) -> Result<()> {
        validation::validate_non_empty_string("run.name", &self.run.name)?;

        if let Some(output) = &self.output {
            match (&output.path, &output.filename) {
                (Some(path), _) => validation::validate_path("output.path", path)?,
                (None, Some(_)) => {
                    return Err(DrillError::MissingConfigError {
                        field: "output.path".to_string(),
                    })
                }
                (None, None) => {}
            }
            if let Some(filename) = &output.filename {
                validation::validate_file_name("output.filename", filename)?;
            }
        }

        if let Some(ratings) = &self.ratings {
            for item in &ratings.items {
                validation::validate_finite("ratings.items.rating", item.rating)?;
            }
        }

        for vehicle in &self.vehicles {
            validation::validate_non_empty_string("vehicles.make", &vehicle.make)?;
            validation::validate_range("vehicles.year", vehicle.year, MIN_VEHICLE_YEAR, 9999)?;
        }

        if let Some(products) = &self.products {
            for product in &products.items {
                validation::validate_finite("products.items.price", product.price)?;
            }
        }

        if let Some(square) = &self.square {
            for input in &square.inputs {
                validation::validate_finite("square.inputs", *input)?;
            }
        }

        Ok(())
    }

    /// 取得輸出目錄
    pub fn output_path(&self) -> Option<&str> {
        self.output.as_ref().and_then(|o| o.path.as_deref())
    }

    /// 取得報告檔名
    pub fn report_filename(&self) -> &str {
        self.output
            .as_ref()
            .and_then(|o| o.filename.as_deref())
            .unwrap_or(DEFAULT_REPORT_FILENAME)
    }
}

impl Validate for DrillsConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const FULL_CONFIG: &str = r#"
[run]
name = "assignment"
description = "Every exercise once"

[output]
path = "./output"

[[format]]
text = "Hello"

[[format]]
text = "Hello"
upper = false

[ratings]
items = [
    { title = "Book A", rating = 4.5 },
    { title = "Book B", rating = 3 },
]

[concat]
arrays = [["a", "b"], [1, 2]]

[[vehicles]]
make = "Toyota"
year = 2020

[[vehicles]]
make = "Honda"
year = 2018
model = "Civic"

[process]
values = ["hello", 10]

[products]
items = [{ name = "Pen", price = 1.5 }]

[days]
days = ["Monday", "saturday"]

[square]
inputs = [5, -3, 0, 2.5]
"#;

    #[test]
    fn test_parse_full_config() {
        let config = DrillsConfig::from_toml_str(FULL_CONFIG).unwrap();

        assert_eq!(config.run.name, "assignment");
        assert_eq!(config.output_path(), Some("./output"));
        assert_eq!(config.report_filename(), DEFAULT_REPORT_FILENAME);
        assert_eq!(config.format.len(), 2);
        assert_eq!(config.format[1].upper, Some(false));
        assert_eq!(config.ratings.as_ref().unwrap().items[1].rating, 3.0);
        assert_eq!(config.vehicles[1].model.as_deref(), Some("Civic"));
        assert_eq!(
            config.process.as_ref().unwrap().values,
            vec![Value::Text("hello".to_string()), Value::Number(10.0)]
        );
        assert_eq!(
            config.days.as_ref().unwrap().days,
            vec![Day::Monday, Day::Saturday]
        );
        assert_eq!(config.square.as_ref().unwrap().inputs, vec![5.0, -3.0, 0.0, 2.5]);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_minimal_config() {
        let config = DrillsConfig::from_toml_str("[run]\nname = \"empty\"\n").unwrap();
        assert!(config.output_path().is_none());
        assert!(config.format.is_empty());
        assert!(config.square.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("STARTER_DRILLS_TEST_NAME", "from-env");

        let config =
            DrillsConfig::from_toml_str("[run]\nname = \"${STARTER_DRILLS_TEST_NAME}\"\n").unwrap();
        assert_eq!(config.run.name, "from-env");

        std::env::remove_var("STARTER_DRILLS_TEST_NAME");
    }

    #[test]
    fn test_unknown_day_is_a_parse_error() {
        let result = DrillsConfig::from_toml_str("[run]\nname = \"x\"\n[days]\ndays = [\"Someday\"]\n");
        assert!(matches!(
            result,
            Err(DrillError::ConfigValidationError { .. })
        ));
    }

    #[test]
    fn test_config_validation() {
        let blank_name = DrillsConfig::from_toml_str("[run]\nname = \"  \"\n").unwrap();
        assert!(blank_name.validate().is_err());

        let filename_without_path =
            DrillsConfig::from_toml_str("[run]\nname = \"x\"\n[output]\nfilename = \"r.json\"\n")
                .unwrap();
        assert!(matches!(
            filename_without_path.validate(),
            Err(DrillError::MissingConfigError { .. })
        ));

        let blank_make = DrillsConfig::from_toml_str(
            "[run]\nname = \"x\"\n[[vehicles]]\nmake = \"\"\nyear = 2000\n",
        )
        .unwrap();
        assert!(blank_make.validate().is_err());

        let too_old = DrillsConfig::from_toml_str(
            "[run]\nname = \"x\"\n[[vehicles]]\nmake = \"Benz\"\nyear = 1700\n",
        )
        .unwrap();
        assert!(too_old.validate().is_err());

        let infinite_square =
            DrillsConfig::from_toml_str("[run]\nname = \"x\"\n[square]\ninputs = [inf]\n").unwrap();
        assert!(infinite_square.validate().is_err());
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(FULL_CONFIG.as_bytes()).unwrap();

        let config = DrillsConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.run.name, "assignment");
    }
}
