pub mod pauli;
