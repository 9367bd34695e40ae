pub mod clock_in;
