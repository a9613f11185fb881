pub mod particles;
pub mod renderer;

pub use particles::ParticleField;
pub use renderer::Renderer;
