// CV conversion: upload → text extraction → label → DOCX assembly.
// The pipeline is synchronous and CPU-bound; handlers run it inside
// tokio::task::spawn_blocking.

pub mod assemble;
pub mod extract;
pub mod handlers;
pub mod label;
pub mod logo;
pub mod models;
pub mod pipeline;
pub mod upload;
