pub mod environment;
pub mod gltf;

pub use self::environment::load_environment;
pub use self::gltf::load_object;
