mod gain;
mod modulation;
mod silencer;
mod stm;
