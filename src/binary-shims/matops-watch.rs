fn main() {
    matops_tasks::entry_points::watch();
}
