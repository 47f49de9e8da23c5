pub mod cli;
pub mod handlers;

pub mod consts {
    pub const IMPORT_CMD: &str = "import";
}
