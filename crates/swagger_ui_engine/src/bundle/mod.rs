/* 📖 # Why a bundle abstraction?

Where the UI assets physically live is a packaging decision of the host: compiled in with
`include_bytes!`, appended to the executable as a zip, or shipped next to it in a
directory. The path map only needs two things from any of them: the list of resource
names and the bytes for a name. ResourceBundle is exactly that seam.
*/

mod archive;
mod directory;
mod memory;
mod traits;

pub use archive::ZipBundle;
pub use directory::DirectoryBundle;
pub use memory::StaticBundle;
pub use traits::{BundleHandle, ResourceBundle};
