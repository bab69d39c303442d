pub mod booklet;
pub mod composite;
pub mod lookup;
pub mod roots;
