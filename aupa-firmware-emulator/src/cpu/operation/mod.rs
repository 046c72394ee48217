mod clear;
mod gain;
mod info;
mod modulation;
mod silencer;
mod stm;
mod sync;
