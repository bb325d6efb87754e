pub mod seaorm;

pub use seaorm::SeaOrmUsersRepository;
