pub mod seaorm;

pub use seaorm::SeaOrmProductsRepository;
