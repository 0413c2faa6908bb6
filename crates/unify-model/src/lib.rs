pub mod collated;
pub mod country;
pub mod directory;
pub mod error;
pub mod outcome;
pub mod table;
pub mod token;

pub use collated::{
    CollatedRow, CollatedTable, DATA_YEAR_COLUMN, DATASET_INDEX_COLUMN, EXTRAS_COLUMNS,
    SourceColumns,
};
pub use country::CountryRecord;
pub use directory::{DirectoryConflict, ReferenceDirectory};
pub use error::{ModelError, Result};
pub use outcome::ResolutionOutcome;
pub use table::{CellValue, Dataset, Row};
pub use token::{HeaderToken, SpellingLocale, TranslationTable};
