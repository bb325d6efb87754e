pub mod seaorm;

pub use seaorm::SeaOrmGeographyRepository;
