mod helpers;
mod test_run;
