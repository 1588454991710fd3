pub mod animal;
