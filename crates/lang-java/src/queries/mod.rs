pub mod java_declarations;
